use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "docql.pest"]
pub struct DocqlParser;
