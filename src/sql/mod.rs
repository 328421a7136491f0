pub(crate) mod infer_type;
pub(crate) mod statement;
