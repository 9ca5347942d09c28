use crate::commands::{with_catalog_pool, CommandResult, Failure, EXIT_PERSISTENCE};
use pricecheck_db::{DemoCatalog, SqlProductRepository};

pub fn run() -> CommandResult {
    let result = with_catalog_pool("seed", |pool| async move {
        let repo = SqlProductRepository::new(pool);

        let seeded = DemoCatalog::load(&repo)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), EXIT_PERSISTENCE))?;

        let verification = DemoCatalog::verify(&repo)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), EXIT_PERSISTENCE))?;

        if !verification.all_present {
            return Err((
                "seed_verification",
                verification_failure_message(&verification.failed_checks()),
                EXIT_PERSISTENCE,
            ));
        }

        Ok::<_, Failure>(seeded.products_seeded)
    });

    match result {
        Ok(barcodes) => {
            let listed =
                barcodes.iter().map(|barcode| format!("  - {barcode}")).collect::<Vec<_>>();
            let message = format!(
                "demo catalog loaded ({} products):\n{}",
                barcodes.len(),
                listed.join("\n")
            );
            CommandResult::success("seed", message)
        }
        Err(failure) => failure,
    }
}

fn verification_failure_message(failed_checks: &[&str]) -> String {
    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for barcodes: {}", failed_checks.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::verification_failure_message;

    #[test]
    fn verification_error_message_targets_failed_checks() {
        let message = verification_failure_message(&["0123456789012", "5012345678900"]);

        assert_eq!(message, "Seed verification failed for barcodes: 0123456789012, 5012345678900");
    }

    #[test]
    fn verification_error_message_falls_back_to_generic_when_no_labels() {
        assert_eq!(verification_failure_message(&[]), "Some seed data failed to load");
    }
}
