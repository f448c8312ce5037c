//! End-to-end flow: TOML declarations through the registry and host map.

#![forbid(unsafe_code)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use colonel_core::{
    CommandRegistry, Config, ConfigHandler, DispatchOutcome, Error, LegacyRenderer, LocalSender,
    MessageRenderer, MetadataProvider, SimpleCommandMap,
};

const ECONOMY: &str = r#"
namespace = "economy"

[[command]]
[command.header]
name = "eco"
aliases = ["money"]
usage = "/eco <give|take> <amount>"
usage_message = "&cUsage: {USAGE}"
permission = "eco.use"
permission_message = "&cYou lack {PERMISSION}"

[[command.method]]
name = "give"
reply = "&aGave {0} to {SENDER}"
[command.method.executor]
name = "give"
aliases = ["add"]
permission = "eco.give"
permission_message = "&cYou lack {PERMISSION}"
min_arguments = 1
max_arguments = 1
usage = "/eco give <amount>"
usage_message = "&cUsage: {USAGE}"

[[command.method]]
name = "balance"
reply = "Balance of {SENDER}: 0"
[command.method.default]
executable_by = "player"
executable_by_message = "&cOnly a {EXECUTABLE_BY} may check a balance"
min_arguments = 0
max_arguments = 0

[[command]]
[command.header]
name = "ping"

[[command.method]]
name = "pong"
reply = "pong {ARGS}"
[command.method.default]
"#;

struct World {
    host: Arc<SimpleCommandMap>,
    registry: CommandRegistry,
}

fn world() -> World {
    let config = Config::from_toml(ECONOMY).expect("config should parse");
    let renderer: Arc<dyn MessageRenderer> = Arc::new(LegacyRenderer);
    let host = Arc::new(SimpleCommandMap::new());
    let registry = CommandRegistry::new(&config.namespace, host.clone(), Arc::clone(&renderer));

    let handlers = ConfigHandler::from_decls(&config.commands, &renderer);
    let providers: Vec<&dyn MetadataProvider> = handlers
        .iter()
        .map(|handler| handler as &dyn MetadataProvider)
        .collect();
    let count = registry
        .register_all(&providers)
        .expect("declarations should register");
    assert_eq!(count, 2);

    World { host, registry }
}

#[test]
fn test_registered_commands_and_labels() {
    let world = world();
    assert_eq!(world.registry.commands(), vec!["eco", "ping"]);
    assert_eq!(
        world.host.known_labels(),
        vec!["eco", "economy:eco", "economy:ping", "money", "ping"]
    );
}

#[test]
fn test_player_with_permissions_gives() {
    let world = world();
    let steve = LocalSender::player("Steve").with_permissions(["eco.use", "eco.give"]);

    let outcome = world
        .host
        .dispatch(&steve, "/eco give 10")
        .expect("eco is registered");

    assert!(outcome.is_invoked());
    assert_eq!(steve.messages(), vec!["§aGave 10 to Steve"]);
}

#[test]
fn test_command_permission_denied() {
    let world = world();
    let nobody = LocalSender::player("Nobody");

    let outcome = world
        .host
        .dispatch(&nobody, "money give 10")
        .expect("money is registered");

    assert_eq!(outcome, DispatchOutcome::Denied("&cYou lack eco.use".to_string()));
    assert_eq!(nobody.messages(), vec!["§cYou lack eco.use"]);
}

#[test]
fn test_executor_usage_on_bad_argument_count() {
    let world = world();
    let steve = LocalSender::player("Steve").with_permissions(["eco.use", "eco.give"]);

    world
        .host
        .dispatch(&steve, "eco give")
        .expect("eco is registered");

    assert_eq!(steve.messages(), vec!["§cUsage: /eco give <amount>"]);
}

#[test]
fn test_default_executor_for_players_only() {
    let world = world();
    let steve = LocalSender::player("Steve").with_permission("eco.use");
    let console = LocalSender::console();

    world.host.dispatch(&steve, "eco").expect("eco is registered");
    world.host.dispatch(&console, "eco").expect("eco is registered");

    assert_eq!(steve.messages(), vec!["Balance of Steve: 0"]);
    assert_eq!(console.messages(), vec!["§cOnly a Player may check a balance"]);
}

#[test]
fn test_unbounded_default_receives_all_arguments() {
    let world = world();
    let console = LocalSender::console();

    world
        .host
        .dispatch(&console, "economy:ping a b c")
        .expect("prefixed label is registered");

    assert_eq!(console.messages(), vec!["pong a b c"]);
}

#[test]
fn test_unknown_label_is_not_found() {
    let world = world();
    let result = world.host.dispatch(&LocalSender::console(), "/bank");
    assert!(matches!(result, Err(Error::NotFound(label)) if label == "bank"));
}

#[test]
fn test_reregistering_same_declarations_fails() {
    let world = world();
    let config = Config::from_toml(ECONOMY).expect("config should parse");
    let renderer: Arc<dyn MessageRenderer> = Arc::new(LegacyRenderer);
    let handlers = ConfigHandler::from_decls(&config.commands, &renderer);

    let result = world.registry.register(&handlers[1]);

    assert!(matches!(result, Err(Error::DuplicateCommand(name)) if name == "ping"));
}
