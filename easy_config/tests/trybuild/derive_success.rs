//! Compile-pass fixture: derive on every supported field shape.

use easy_config::{MapEnv, Populate};
use url::Url;

#[derive(Populate)]
struct Empty {}

#[derive(Populate)]
struct Marker;

#[derive(Populate)]
struct Everything {
    #[config(env_or_cli = "endpoint", required)]
    endpoint: Url,
    #[config(env = "APP_NAME", default = "demo")]
    name: String,
    #[config(cli)]
    r#type: Option<String>,
    #[config(cli = "count")]
    #[config(required, default = "3")]
    count: std::option::Option<u64>,
    #[config(env = "APP_RATIO")]
    ratio: f32,
    untouched: Vec<String>,
}

fn main() {
    let env = MapEnv::new();
    let _ = Empty::populate_from(["a=b"], &env);
    let _ = Marker::populate_from(Vec::<String>::new(), &env);
    let _ = Everything::populate_from(["endpoint=http://localhost"], &env);
}
