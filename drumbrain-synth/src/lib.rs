#![no_std]

pub mod commands;
pub mod effect;
pub mod output;
pub mod synth;
