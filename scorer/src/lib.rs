pub mod ahp;
pub mod binpack;
pub mod config;
pub mod criteria;
pub mod enumerate;
pub mod errors;
pub mod evaluate;
pub mod metrics;
pub mod plugin;
pub mod updater;

#[cfg(test)]
mod test_setup {
    use std::sync::Once;
    static INIT: Once = Once::new();

    #[ctor::ctor]
    fn init_tracing() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .init();
        });
    }
}
