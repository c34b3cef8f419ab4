#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

mod commands;
mod malformed;
mod round_trip;
mod rules;
mod templates;
mod test_utils;
