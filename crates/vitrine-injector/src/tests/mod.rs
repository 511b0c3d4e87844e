/* crates/vitrine-injector/src/tests/mod.rs */
