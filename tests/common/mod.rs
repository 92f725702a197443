use log::LevelFilter;
use prequellib::engine::test_objects::TestMetadata;
use prequellib::engine::{AllowAllAccessControl, Engine};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::sync::Arc;

pub fn _init_logging() {
    //A second test binary may already have installed a logger
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

pub fn _create_engine() -> Engine {
    Engine::new(
        Arc::new(TestMetadata::with_sample_catalog()),
        Arc::new(AllowAllAccessControl),
    )
}
