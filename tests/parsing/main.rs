mod parser;
mod samples;
mod validate;
