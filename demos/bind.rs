use std::collections::HashMap;

use chrono::NaiveDateTime;
use param_binder::{Binder, Color, FieldDescriptor, FieldTable, Params};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Default)]
struct ServerSettings {
    host: String,
    port: i32,
    debug: bool,
    aliases: Vec<String>,
    headers: HashMap<String, String>,
    started: Option<NaiveDateTime>,
    homepage: Option<Url>,
    accent: Option<Color>,
}

impl FieldTable for ServerSettings {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("host", |s: &mut Self, v: String| s.host = v).required(),
            FieldDescriptor::new("port", |s: &mut Self, v: i32| s.port = v).default_value("80"),
            FieldDescriptor::new("debug", |s: &mut Self, v: bool| s.debug = v)
                .default_value("false"),
            FieldDescriptor::new("aliases", |s: &mut Self, v: Vec<String>| s.aliases = v),
            FieldDescriptor::new("headers", |s: &mut Self, v: HashMap<String, String>| {
                s.headers = v
            }),
            FieldDescriptor::new("started", |s: &mut Self, v: Option<NaiveDateTime>| {
                s.started = v
            }),
            FieldDescriptor::new("homepage", |s: &mut Self, v: Option<Url>| s.homepage = v),
            FieldDescriptor::new("accent", |s: &mut Self, v: Option<Color>| s.accent = v)
                .named("accent.color")
                .default_value("#3366CC"),
        ]
    }
}

fn main() -> Result<(), param_binder::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Later sources override earlier ones: PARAMS__SERVER__PORT=9090 wins over the file.
    // An env var can only set a scalar, so PARAMS__SERVER__ALIASES=x replaces the
    // aliases list with a leaf and the strict bind below rejects it.
    let params = Params::builder()
        .with_file("demos/default.toml", true)
        .with_file("demos/local.toml", false)
        .with_env("PARAMS", "__")
        .build()?;

    let Some(server) = params.get_child("server") else {
        println!("no [server] section");
        return Ok(());
    };

    let mut settings = ServerSettings::default();
    Binder::new().bind_object(server, &mut settings)?;

    println!("{}:{} (debug={})", settings.host, settings.port, settings.debug);
    println!("aliases: {}", settings.aliases.join(", "));
    println!("headers: {:?}", settings.headers);
    if let Some(started) = settings.started {
        println!("started: {started}");
    }
    if let Some(homepage) = &settings.homepage {
        println!("homepage: {homepage}");
    }
    if let Some(accent) = settings.accent {
        println!("accent: #{:02X}{:02X}{:02X}", accent.red, accent.green, accent.blue);
    }

    Ok(())
}
