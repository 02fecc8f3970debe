mod common;
mod query;
