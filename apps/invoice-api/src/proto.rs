//! Generated Protocol Buffer types.
//!
//! The actual code is produced by `tonic-build` from
//! `proto/invoice_api.proto` at build time.

tonic::include_proto!("quill.invoice.v1");
