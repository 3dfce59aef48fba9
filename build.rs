fn main() {
    // askama compiles templates/ into the binary; a directory entry makes cargo
    // rescan it on every build.
    println!("cargo:rerun-if-changed=templates");
}
