#![cfg(test)]
mod check;
mod scan;
mod util;
