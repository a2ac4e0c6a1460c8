/*
 * This module provides data aquisition abilites for the application.
 * It doesn't care what it gets, just how.
 * The session layer drives it through the `ControllerTransport` trait, so tests
 * can swap the HTTPS client for a scripted one.
 */

pub mod core;
pub mod restconf;
