//! Control core of a two pad drum trigger brain.
//!
//! Everything in here runs from a single cooperative loop: [`brain::DrumBrain::tick`] is
//! called as often as possible and advances the hit detectors, samples the controls, drives
//! the menu and schedules persistence. Hardware, sound and display are reached through the
//! collaborator traits in [`io`].
#![no_std]

use enum_iterator::Sequence;

pub mod brain;
pub mod config;
pub mod controls;
pub mod io;
pub mod menu;
pub mod note;
pub mod presentation;
pub mod store;
pub mod time;
pub mod trigger;

/// Amount of drum pads the brain handles.
pub const CHANNELS: usize = 2;

/// Largest value the ADC produces for pads and potentiometers.
pub const ADC_MAX: u16 = 4095;

/// One physical drum pad and everything derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Drum1,
    Drum2,
}

impl Channel {
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    Unknown(usize),
}

impl TryFrom<usize> for Channel {
    type Error = ChannelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::Drum1),
            1 => Ok(Channel::Drum2),
            other => Err(ChannelError::Unknown(other)),
        }
    }
}
