fn main() {
    println!("cargo:rerun-if-changed=proto/rect.proto");
    tonic_prost_build::configure()
        .compile_protos(&["proto/rect.proto"], &["proto/"])
        .expect("Failed to compile proto/rect.proto");
}
