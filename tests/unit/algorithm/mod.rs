mod executor;
mod history;
