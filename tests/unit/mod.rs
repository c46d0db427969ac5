mod bidcycle;
mod filters;
mod saved_search;
mod share;
