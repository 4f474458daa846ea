use netbox_config::{EnvironmentOverrides, RawConfig};
use netbox_core::Diagnostics;
use netbox_provider::{ConfigureResponse, NetboxProvider};

fn configure(raw: &RawConfig, env: EnvironmentOverrides) -> ConfigureResponse {
    NetboxProvider::new().configure(raw, env)
}

fn print_diagnostics(diagnostics: &Diagnostics, json: bool) -> netbox_core::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(diagnostics)?);
        return Ok(());
    }
    for d in diagnostics {
        println!("  {d}");
    }
    Ok(())
}

pub(super) fn cmd_check(
    raw: &RawConfig,
    env: EnvironmentOverrides,
    json: bool,
) -> netbox_core::Result<()> {
    let resp = configure(raw, env);

    if !json {
        println!("NetBox provider configuration check");
        println!();
    }
    print_diagnostics(&resp.diagnostics, json)?;

    let Some(client) = resp.client else {
        return Err(resp.diagnostics.into_error());
    };

    if !json {
        if !resp.diagnostics.is_empty() {
            println!();
        }
        println!("  ✅ client ready for {}", client.base_url());
        println!(
            "     {} warning(s), schemes: {}",
            resp.diagnostics.warnings().count(),
            client
                .schemes()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

pub(super) async fn cmd_status(
    raw: &RawConfig,
    env: EnvironmentOverrides,
    json: bool,
) -> netbox_core::Result<()> {
    let resp = configure(raw, env);
    if resp.has_error() {
        print_diagnostics(&resp.diagnostics, json)?;
        return Err(resp.diagnostics.into_error());
    }
    let Some(client) = resp.client else {
        return Err(netbox_core::NetboxError::NotConfigured);
    };
    if !json {
        print_diagnostics(&resp.diagnostics, false)?;
        println!("Checking status at {}...", client.base_url());
    }

    let status = client.status().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let version = status["netbox-version"].as_str().unwrap_or("unknown");
    println!("  ✅ NetBox {version} is reachable");
    if let Some(workers) = status["rq-workers-running"].as_u64() {
        println!("     RQ workers running: {workers}");
    }
    Ok(())
}
