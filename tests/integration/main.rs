mod action;
mod basic;
mod utils;
