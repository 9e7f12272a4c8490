//! Compatibility oracle binary entrypoint.

use compat_oracle::{run_reference_check, ReferenceVector};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compat_oracle=info,optionvault_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let vector = ReferenceVector::option_vault();
    let report = run_reference_check(&vector)?;

    // Cross-check values for the other implementations
    tracing::info!("Domain Separator (EIP712): 0x{}", report.domain_separator);
    tracing::info!("Struct Hash (WriteOption): 0x{}", report.struct_hash);
    tracing::info!("Message Hash: 0x{}", report.message_hash);
    tracing::info!("Signature: 0x{}", report.signature);
    tracing::info!("Recovered Signer: {}", report.recovered_signer);

    tracing::debug!("report: {}", serde_json::to_string_pretty(&report)?);

    if report.matches() {
        tracing::info!("reference vector reproduced byte-for-byte");
        Ok(())
    } else {
        tracing::error!(
            hash_matches = report.hash_matches,
            signature_matches = report.signature_matches,
            signer_matches = report.signer_matches,
            "reference vector mismatch"
        );
        std::process::exit(1);
    }
}
