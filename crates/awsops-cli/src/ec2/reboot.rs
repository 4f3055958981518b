//! The reboot driver: pre-check, reboot, post-check, optional wait.
//!
//! The dry-run path stops after the pre-check; no mutating endpoint is
//! ever called. The post-check is deliberately modest: EC2 frequently
//! reports `running` straight through an OS-level reboot, so a
//! running-before-and-after observation is annotated as inconclusive
//! rather than treated as success or failure.

use std::time::Duration;

use colored::Colorize;
use tokio::time::sleep;

use awsops_client::InstanceService;
use awsops_core::{InstanceState, OpsError, Result};

/// Knobs for one reboot run
#[derive(Debug, Clone)]
pub struct RebootOptions {
    /// Stop after the pre-check and report what would happen
    pub dry_run: bool,

    /// Print API request IDs and audit-log lookup guidance
    pub verbose: bool,

    /// Pause between issuing the reboot and the single post-check
    pub settle_delay: Duration,

    /// Pause between status-ok polls
    pub poll_interval: Duration,
}

impl Default for RebootOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verbose: false,
            settle_delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(15),
        }
    }
}

/// Terminal states of one reboot attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebootOutcome {
    /// Dry run: the pre-check ran and a reboot would have been issued
    WouldReboot,

    /// The reboot was issued. `conclusive` is false when the instance
    /// reported `running` both before and after the request.
    Rebooted {
        /// Whether the post-check observed an actual state change
        conclusive: bool,
    },
}

/// Reboot one instance.
///
/// The pre-check warns on states outside {running, stopping, stopped} but
/// never blocks: the provider is the final arbiter of validity. Failures
/// of the post-check are warnings only; the reboot has already been
/// accepted at that point.
pub async fn reboot_instance<S: InstanceService>(
    service: &S,
    instance_id: &str,
    region: &str,
    options: &RebootOptions,
) -> Result<RebootOutcome> {
    println!(
        "{}",
        format!("Rebooting instance {instance_id} in region {region}...").yellow()
    );

    let before = service.describe(instance_id).await?;
    println!(
        "{}",
        format!("Instance current state: {}", before.state).cyan()
    );

    if !before.state.is_rebootable() {
        println!(
            "{}",
            format!(
                "Warning: Instance is in '{}' state. Reboot may not work as expected.",
                before.state
            )
            .red()
        );
    }

    if options.dry_run {
        println!(
            "{}",
            format!("DRY RUN: Would reboot instance {instance_id}").cyan()
        );
        return Ok(RebootOutcome::WouldReboot);
    }

    let receipt = service.reboot(instance_id).await?;
    println!(
        "{}",
        format!("Successfully initiated reboot for instance {instance_id}").green()
    );

    if options.verbose {
        let request_id = receipt.request_id.as_deref().unwrap_or("Unknown");
        println!("{}", format!("API Request ID: {request_id}").cyan());
        println!("{}", "To verify this API call in CloudTrail:".cyan());
        println!(
            "{}",
            format!(
                "  1. Open the CloudTrail console: https://{region}.console.aws.amazon.com/cloudtrail/home?region={region}#"
            )
            .cyan()
        );
        println!("{}", "  2. Select 'Event history'".cyan());
        println!(
            "{}",
            "  3. Filter by 'Event name' = 'RebootInstances'".cyan()
        );
        println!(
            "{}",
            format!("  4. Look for Request ID: {request_id}").cyan()
        );
    }

    println!("{}", "Verifying reboot initiated...".yellow());
    sleep(options.settle_delay).await;

    let mut conclusive = true;
    match service.describe(instance_id).await {
        Ok(after) => {
            println!(
                "{}",
                format!("Post-reboot request state: {}", after.state).cyan()
            );

            if before.state == InstanceState::Running && after.state == InstanceState::Running {
                conclusive = false;
                println!(
                    "{}",
                    "Note: EC2 shows 'running' status even during a reboot.".yellow()
                );
                println!(
                    "{}",
                    "The reboot is likely still in progress at the instance level.".yellow()
                );
            }
        }
        Err(err) => {
            println!(
                "{}",
                format!("Unable to verify post-reboot state: {err}").yellow()
            );
        }
    }

    Ok(RebootOutcome::Rebooted { conclusive })
}

/// Poll until the instance passes its status checks or the attempt budget
/// derived from `timeout` runs out.
pub async fn wait_for_status_ok<S: InstanceService>(
    service: &S,
    instance_id: &str,
    timeout: Duration,
    options: &RebootOptions,
) -> Result<()> {
    let interval = options.poll_interval;
    let attempts = (timeout.as_secs() / interval.as_secs().max(1)).max(1);

    println!(
        "{}",
        format!("Waiting for instance {instance_id} to pass status checks...").yellow()
    );
    println!(
        "{}",
        format!(
            "Will check every {} seconds for up to {} seconds.",
            interval.as_secs(),
            timeout.as_secs()
        )
        .yellow()
    );

    for attempt in 1..=attempts {
        if service.status_ok(instance_id).await? {
            println!("{}", format!("Instance {instance_id} is now OK!").green());
            return Ok(());
        }

        if attempt < attempts {
            sleep(interval).await;
        }
    }

    Err(OpsError::WaitTimeout {
        instance_id: instance_id.to_string(),
        waited: timeout.as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use awsops_core::{InstanceSummary, RebootReceipt};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeService {
        // Successive describe results; None means not found.
        describes: Mutex<VecDeque<Option<InstanceSummary>>>,
        status_checks: Mutex<VecDeque<bool>>,
        reboots: AtomicUsize,
        status_calls: AtomicUsize,
    }

    impl FakeService {
        fn with_states(states: &[InstanceState]) -> Self {
            Self {
                describes: Mutex::new(
                    states
                        .iter()
                        .map(|state| {
                            Some(InstanceSummary {
                                instance_id: "i-0abc".to_string(),
                                state: *state,
                                name_tag: Some("web-1".to_string()),
                            })
                        })
                        .collect(),
                ),
                status_checks: Mutex::new(VecDeque::new()),
                reboots: AtomicUsize::new(0),
                status_calls: AtomicUsize::new(0),
            }
        }

        fn with_status_checks(checks: &[bool]) -> Self {
            let service = Self::with_states(&[]);
            *service.status_checks.lock().unwrap() = checks.iter().copied().collect();
            service
        }

        fn reboot_count(&self) -> usize {
            self.reboots.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InstanceService for FakeService {
        async fn describe(&self, instance_id: &str) -> Result<InstanceSummary> {
            match self.describes.lock().unwrap().pop_front() {
                Some(Some(summary)) => Ok(summary),
                _ => Err(OpsError::InstanceNotFound {
                    name: instance_id.to_string(),
                }),
            }
        }

        async fn by_name_tag(&self, _name: &str) -> Result<Vec<InstanceSummary>> {
            Ok(Vec::new())
        }

        async fn reboot(&self, _instance_id: &str) -> Result<RebootReceipt> {
            self.reboots.fetch_add(1, Ordering::SeqCst);
            Ok(RebootReceipt {
                request_id: Some("req-123".to_string()),
            })
        }

        async fn status_ok(&self, _instance_id: &str) -> Result<bool> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.status_checks.lock().unwrap().pop_front().unwrap_or(false))
        }
    }

    fn instant(dry_run: bool) -> RebootOptions {
        RebootOptions {
            dry_run,
            verbose: false,
            settle_delay: Duration::ZERO,
            poll_interval: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn dry_run_never_calls_the_mutating_endpoint() {
        let fake = FakeService::with_states(&[InstanceState::Running]);

        let outcome = reboot_instance(&fake, "i-0abc", "us-west-2", &instant(true))
            .await
            .unwrap();

        assert_eq!(outcome, RebootOutcome::WouldReboot);
        assert_eq!(fake.reboot_count(), 0);
    }

    #[tokio::test]
    async fn running_before_and_after_is_inconclusive() {
        let fake = FakeService::with_states(&[InstanceState::Running, InstanceState::Running]);

        let outcome = reboot_instance(&fake, "i-0abc", "us-west-2", &instant(false))
            .await
            .unwrap();

        assert_eq!(outcome, RebootOutcome::Rebooted { conclusive: false });
        assert_eq!(fake.reboot_count(), 1);
    }

    #[tokio::test]
    async fn observed_state_change_is_conclusive() {
        let fake = FakeService::with_states(&[InstanceState::Stopped, InstanceState::Pending]);

        let outcome = reboot_instance(&fake, "i-0abc", "us-west-2", &instant(false))
            .await
            .unwrap();

        assert_eq!(outcome, RebootOutcome::Rebooted { conclusive: true });
    }

    #[tokio::test]
    async fn post_check_failure_is_only_a_warning() {
        // One describe for the pre-check, then nothing: the post-check
        // fails but the reboot still reports as issued.
        let fake = FakeService::with_states(&[InstanceState::Running]);

        let outcome = reboot_instance(&fake, "i-0abc", "us-west-2", &instant(false))
            .await
            .unwrap();

        assert!(matches!(outcome, RebootOutcome::Rebooted { .. }));
        assert_eq!(fake.reboot_count(), 1);
    }

    #[tokio::test]
    async fn missing_instance_fails_before_reboot() {
        let fake = FakeService::with_states(&[]);

        let err = reboot_instance(&fake, "i-0abc", "us-west-2", &instant(false))
            .await
            .unwrap_err();

        assert!(matches!(err, OpsError::InstanceNotFound { .. }));
        assert_eq!(fake.reboot_count(), 0);
    }

    #[tokio::test]
    async fn wait_returns_once_status_is_ok() {
        let fake = FakeService::with_status_checks(&[false, false, true]);

        wait_for_status_ok(&fake, "i-0abc", Duration::from_secs(10), &instant(false))
            .await
            .unwrap();

        assert_eq!(fake.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn wait_fails_after_exhausting_the_attempt_budget() {
        let fake = FakeService::with_status_checks(&[]);

        let err = wait_for_status_ok(&fake, "i-0abc", Duration::from_secs(3), &instant(false))
            .await
            .unwrap_err();

        match err {
            OpsError::WaitTimeout { waited, .. } => assert_eq!(waited, 3),
            other => panic!("expected WaitTimeout, got {other:?}"),
        }
        assert_eq!(fake.status_calls.load(Ordering::SeqCst), 3);
    }
}
