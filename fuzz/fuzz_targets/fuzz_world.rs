#![no_main]

use dork::world::{load_str, validate};
use dork::{Game, GameConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = serde_yaml::from_str::<serde_yaml::Value>(text) else {
        return;
    };

    // Structure checks and the validator agree on what is loadable.
    let report = validate(&value);
    let loaded = load_str(text);
    if report.is_err() {
        assert!(loaded.is_err());
    }

    if let Ok(document) = loaded {
        let game = Game::new(document, GameConfig::default());
        let _ = game.scene();
        let saved = game.save();
        if let Ok(yaml) = saved.to_yaml() {
            let again = load_str(&yaml);
            assert!(again.is_ok());
        }
    }
});
