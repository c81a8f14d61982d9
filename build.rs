const COMMANDS: &[&str] = &["get_shared_data"];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
