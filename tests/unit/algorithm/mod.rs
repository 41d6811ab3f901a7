mod executor;
mod rule;
