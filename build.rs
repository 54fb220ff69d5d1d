fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // ESP-IDF environment only matters for firmware builds; host tests skip it.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
