//! HTTP plumbing shared by every resource.

pub mod rest;
