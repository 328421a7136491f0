use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use pandra::{
    Frame, LoadOptions, MemorySession, TracingObserver, Value, create_table, infer_schema,
    load_with_options,
};

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut frame = Frame::new([
        ("id", "int64"),
        ("username", "object"),
        ("email", "object"),
        ("score", "float64"),
        ("is_active", "bool"),
    ]);
    frame.push_values(vec![
        Value::Integer(1),
        "Alice".into(),
        "alice@example.org".into(),
        Value::Float(30.5),
        Value::Boolean(true),
    ])?;
    frame.push_values(vec![
        Value::Integer(2),
        "Bob".into(),
        Value::Null,
        Value::Float(12.0),
        Value::Boolean(false),
    ])?;
    frame.push_values(vec![
        Value::Integer(3),
        "Charlie".into(),
        "charlie@example.org".into(),
        Value::Float(7.25),
        Value::Boolean(true),
    ])?;

    let schema = infer_schema("users", Some("demo"), &frame, &["id", "username"])?;
    println!("{}", create_table(&schema));

    let mut session = MemorySession::new();
    let options = LoadOptions::new().create_if_missing(true);

    let dry_run = load_with_options(
        &schema,
        frame.clone(),
        &mut session,
        &options.debug(true),
        &mut TracingObserver,
    )?;
    println!("Dry run: {} of {} rows", dry_run.succeeded, dry_run.attempted);

    let report = load_with_options(&schema, frame, &mut session, &options, &mut TracingObserver)?;
    println!(
        "Loaded {} of {} rows into {} ({} failed)",
        report.succeeded,
        report.attempted,
        schema.qualified_name(),
        report.failed
    );

    for (i, executed) in session.executed().iter().enumerate() {
        let args: Vec<String> = executed.args.iter().map(Value::to_string).collect();
        println!("{: <4} | {} | {}", i, executed.statement, args.join(", "));
    }

    Ok(())
}
