use modindex_lib::{ProgressReporter, ValidationStage};

/// Prints progress lines to stdout
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn stage(&self, stage: ValidationStage) {
        match stage {
            ValidationStage::FetchingIndex => {
                println!("Attempting to validate index file...")
            }
            ValidationStage::FetchingManifests => {
                println!("Attempting to validate all manifests...")
            }
            // Reported by done()
            _ if stage.is_terminal() => {}
            _ => log::debug!("Stage: {}", stage),
        }
    }

    fn index_validated(&self, identifiers: usize, manifests: usize) {
        println!(
            "Index file validated successfully ({} identifiers, {} manifests).",
            identifiers, manifests
        );
    }

    fn manifests_checked(&self, checked: usize, total: usize) {
        println!("Checked {} / {} of manifests.", checked, total);
    }

    fn done(&self, success: bool, message: Option<&str>) {
        if success {
            println!("All manifests validated successfully.");
        } else {
            eprintln!("Validation failed: {}", message.unwrap_or("unknown error"));
        }
    }
}
