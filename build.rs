fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, proptest) skip the ESP-IDF environment entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
