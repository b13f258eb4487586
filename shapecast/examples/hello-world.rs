use shapecast::{
    Dispatcher, Event, Handler, IntValue, Shape, ValueEvent,
    monitoring::{HandlerFailure, Monitor},
    monitors::{ShapeMonitor, Tracer},
    value_event,
};
use tracing_subscriber::EnvFilter;

// Built-in shapes can be wrapped to get a distinct routing tag
value_event!(struct HealthChanged(IntValue: i32) = "health_changed");
value_event!(struct ScoreChanged(IntValue: i32) = "score_changed");

// Or declare an event from scratch
#[derive(Debug, Clone)]
struct PlayerJoined {
    name: String,
}

impl Event for PlayerJoined {
    const SHAPE: Shape = Shape::new("player_joined");
}

// Custom monitor demonstrating the Monitor trait.
// For simple logging, `shapecast::monitors::Tracer` is enough.
struct Printer;

impl Monitor for Printer {
    fn on_handler_failed(&self, failure: &HandlerFailure) {
        println!("!! {failure}");
    }
}

fn main() {
    // RUST_LOG=trace cargo run --example hello-world
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dispatcher = Dispatcher::new();
    let stats = ShapeMonitor::new();
    dispatcher.monitors().add(Tracer);
    dispatcher.monitors().add(Printer);
    dispatcher.monitors().add(stats.clone());

    let greeter = Handler::named("greeter", |e: &PlayerJoined| {
        println!("Hello, {}!", e.name);
    });
    let hud = Handler::named("hud", |e: &HealthChanged| {
        println!("health: {}", e.value());
    });
    // Rejects negative scores; the first rejection unsubscribes it
    let leaderboard = Handler::named("leaderboard", |e: &ScoreChanged| {
        if e.value() < 0 {
            return Err(format!("negative score {}", e.value()));
        }
        println!("score: {}", e.value());
        Ok(())
    });

    dispatcher.subscribe(&greeter);
    dispatcher.subscribe(&hud);
    dispatcher.subscribe(&leaderboard);

    dispatcher.dispatch(&PlayerJoined {
        name: "World".into(),
    });
    dispatcher.dispatch(&HealthChanged::from(90));
    dispatcher.dispatch(&ScoreChanged::from(10));
    dispatcher.dispatch(&ScoreChanged::from(-5));
    // Nobody listens to scores anymore
    dispatcher.dispatch(&ScoreChanged::from(20));

    for shape in stats.shapes() {
        println!(
            "{shape}: {} active, {} dispatches, {} failures",
            stats.active_subscriptions(&shape),
            stats.dispatch_count(&shape),
            stats.failure_count(&shape),
        );
    }

    dispatcher.unsubscribe(&greeter);
    dispatcher.unsubscribe(&hud);
}
