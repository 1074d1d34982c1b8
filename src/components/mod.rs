//! Leptos components provided by ember-glow.

pub mod embers;
