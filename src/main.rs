//! pinch_volume — interactive entry point.

use pinch_volume::app::{run, AppConfig};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Pinch Volume Control — gesture level controller       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Capture: webcam (nokhwa)");
    #[cfg(not(feature = "camera"))]
    println!("  Capture: simulated backdrop  (use --features camera for a webcam)");

    #[cfg(feature = "alsa")]
    println!("  Mixer:   ALSA Master");
    #[cfg(not(feature = "alsa"))]
    println!("  Mixer:   simulated  (use --features alsa for the real mixer)");

    println!();
    println!("  Pinch fingers to control volume — Q quits.");
    println!();

    if let Err(e) = run(AppConfig::default()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
