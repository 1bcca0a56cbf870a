//! Assistant publication: build the JSON document for the chat widget from
//! a commerce profile + catalog, publish it to a public Gist, and write the
//! resulting raw URL back onto the commerce.

pub mod builder;
pub mod executor;
pub mod gist_client;
