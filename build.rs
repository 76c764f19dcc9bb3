fn main() {
    println!("cargo:rerun-if-changed=src/portal/dashboard.html");

    // Host builds (tests, fuzzing) have no ESP-IDF environment to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
