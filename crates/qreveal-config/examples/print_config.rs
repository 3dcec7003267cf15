/// Example program to print the loaded configuration
///
/// Run with: cargo run -p qreveal-config --example print_config

fn main() {
    let config = qreveal_config::QrevealConfig::load();

    println!("=== qreveal Configuration ===\n");

    println!("Demo Settings:");
    println!("  Text: {:?}", config.demo.text);
    println!("  Window: {}x{} ({:?})", config.demo.width, config.demo.height, config.demo.title);
    println!("  Fill: {}", config.demo.fill);
    println!();

    println!("Code Settings:");
    println!("  Error Correction: {}", config.code.error_correction);
    println!("  Min Version: {}", config.code.min_version);
    println!();

    println!("Animation Settings:");
    println!("  Duration: {}ms", config.animation.duration_ms);
    println!("  Mode: {:?}", config.animation.mode);
    println!("  Easing: {:?}", config.animation.easing);
    println!("  Reverse: {}", config.animation.reverse);
    println!("  Offset Scale: {}", config.animation.offset_scale);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
