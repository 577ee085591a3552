#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(config) = toml::from_str::<crossbench_types::ConfigFile>(s)
    {
        let _ = crossbench_app::resolve_settings(&config, Default::default());
    }
});
