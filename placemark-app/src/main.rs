use placemark::prelude::*;

/// Headless tour of the national capitals.
///
/// Stands in for a map widget: go-to animations are simulated with a delay
/// proportional to the distance flown, and markers are written to the log.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let builder = CrawlerBuilder::new();
    let view = ConsoleView::new(builder.notifier());
    let (driver, handle) = builder.with_view(view).with_layer(ConsoleLayer).build()?;

    let crawl = driver.spawn();

    let ctrl_c = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("interrupted, stopping after the current step");
            ctrl_c.cancel();
        }
    });

    let report = crawl.await??;

    println!("Tour {}:", report.state);
    println!(
        "   {} capitals listed, {} shown, {} without coordinates, {} malformed, {} failed",
        report.discovered, report.displayed, report.no_result, report.malformed, report.fetch_failed
    );
    for marker in &report.markers {
        println!("   📍 {} [{}] {}", marker.label(), marker.style(), marker.position());
    }

    Ok(())
}

/// Pretends to fly the camera and reports back when it lands
struct ConsoleView {
    notifier: ViewNotifier,
    center: LatLng,
}

impl ConsoleView {
    /// Base time for any go-to, plus this much per 1000 km flown
    const BASE_FLIGHT: Duration = Duration::from_millis(300);
    const PER_1000_KM: Duration = Duration::from_millis(150);

    fn new(notifier: ViewNotifier) -> Self {
        Self {
            notifier,
            center: LatLng::default(),
        }
    }
}

impl MapView for ConsoleView {
    fn center_on(&mut self, position: LatLng) {
        let kilometers = self.center.distance_to(&position) / 1000.0;
        let flight = Self::BASE_FLIGHT + Self::PER_1000_KM.mul_f64(kilometers / 1000.0);
        log::info!("flying to {} ({:.0} km, {:?})", position, kilometers, flight);
        self.center = position;

        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            tokio::time::sleep(flight).await;
            notifier.animation_completed();
        });
    }
}

struct ConsoleLayer;

impl MarkerLayer for ConsoleLayer {
    fn add(&mut self, marker: &Marker) {
        log::debug!("layer + {} [{}]", marker.label(), marker.style());
    }

    fn remove(&mut self, marker: &Marker) {
        log::debug!("layer - {} [{}]", marker.label(), marker.style());
    }
}
