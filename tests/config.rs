#[test]
fn config_defaults_are_usable() {
    let cfg = payments_gateway::config::AppConfig::from_env();
    assert!(!cfg.bind_addr.is_empty());
    assert!(!cfg.bank_url.is_empty());
    assert!(cfg.ledger_buffer > 0);
}
