mod common;
mod encoding;
mod features;
mod service;
