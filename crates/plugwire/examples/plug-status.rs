//! Print model, relay and LED state of a plug.
//!
//! Run with: `cargo run --example plug-status -- 192.168.0.42`

use std::time::Duration;

use plugwire::{Plug, PlugConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::args()
        .nth(1)
        .ok_or("usage: plug-status <host>")?;

    let plug = Plug::new(PlugConfig::new(host).with_idle_timeout(Duration::from_secs(3)));

    let info = plug.get_sys_info().await?;
    println!("alias:  {}", info["alias"].as_str().unwrap_or("?"));
    println!("model:  {}", plug.get_model().await?);
    println!("relay:  {}", if plug.get_power_state().await? { "on" } else { "off" });
    println!("led:    {}", if plug.get_led_state().await? { "on" } else { "off" });

    Ok(())
}
