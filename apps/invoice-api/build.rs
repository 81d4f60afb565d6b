//! Build script for compiling Protocol Buffer definitions.
//!
//! Compiles the .proto files into Rust code using tonic-build. The generated
//! code is placed in `$OUT_DIR` and included via `tonic::include_proto!`.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tell Cargo to rerun this build script if the proto file changes
    println!("cargo:rerun-if-changed=../../proto/invoice_api.proto");
    println!("cargo:rerun-if-changed=../../proto");

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["../../proto/invoice_api.proto"], &["../../proto"])?;

    Ok(())
}
