//! Sequential upload queue with per-file status tracking.
//!
//! A batch uploads its files strictly one after another: the next upload
//! is not issued until the previous one has resolved. Failures are
//! isolated to their file; the batch keeps going and reports per-file
//! outcomes at the end. Admission is all-or-nothing against the usage
//! quota, checked before the first request goes out.

use tracing::{info, warn};

use crate::api::{ExtractionApi, UsageQuota};
use crate::error::BatchError;
use crate::models::{ProcessedRecord, SelectedFile};
use crate::quota::QuotaGate;

/// Lifecycle of one file within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Queued, not yet sent.
    Pending,
    /// Upload in flight.
    InProgress,
    /// Processed; records were returned.
    Completed,
    /// Upload or processing failed.
    Error,
}

impl FileState {
    /// Completed and Error are terminal; a file reaches exactly one of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileState::Completed | FileState::Error)
    }
}

/// Per-file outcome, kept in upload order.
#[derive(Debug, Clone)]
pub struct FileStatus {
    /// Original file name.
    pub name: String,

    /// Current lifecycle state.
    pub state: FileState,

    /// Error message for failed files.
    pub error: Option<String>,

    /// Number of records this file produced.
    pub records: usize,
}

/// Progress notifications emitted while a batch runs.
///
/// Every file produces exactly one `FileCompleted` or `FileFailed`, and
/// every run ends with exactly one `Finished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Batch admitted; uploads are about to start.
    Started { total: usize },
    /// A file's upload went out.
    FileStarted { name: String },
    /// A file finished with records.
    FileCompleted { name: String, records: usize },
    /// A file failed; the batch continues.
    FileFailed { name: String, error: String },
    /// The usage counters were re-read after a successful upload.
    QuotaUpdated { quota: UsageQuota },
    /// All files reached a terminal state.
    Finished { succeeded: usize, failed: usize },
}

/// Everything a finished batch produced.
#[derive(Debug)]
pub struct BatchReport {
    /// Per-file outcomes, in upload order.
    pub statuses: Vec<FileStatus>,

    /// All records, ordered by upload order then payload order.
    pub records: Vec<ProcessedRecord>,

    /// Counters from the last quota check, `None` when that check failed.
    pub quota_after: Option<UsageQuota>,
}

impl BatchReport {
    /// Number of files that completed.
    pub fn succeeded(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| s.state == FileState::Completed)
            .count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| s.state == FileState::Error)
            .count()
    }
}

/// A single-use queue of files, uploaded in order.
pub struct UploadQueue {
    files: Vec<SelectedFile>,
}

impl UploadQueue {
    /// Queue the given files. Order is preserved.
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }

    /// Number of queued files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the queue holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Run the batch to completion.
    ///
    /// The quota gate is consulted first; a known shortfall rejects the
    /// whole batch before any upload is issued. Afterwards the files go
    /// out one at a time. Each success appends its records to the report
    /// and re-reads the usage counters; a failed re-read only makes the
    /// counters unknown. Each failure is recorded on its file and the
    /// loop continues.
    pub async fn run<A: ExtractionApi>(
        self,
        api: &A,
        tool: &str,
        user_id: &str,
        mut observer: impl FnMut(BatchEvent),
    ) -> Result<BatchReport, BatchError> {
        if self.is_empty() {
            return Err(BatchError::NoFiles);
        }

        let gate = QuotaGate::check(api, tool)
            .await
            .map_err(BatchError::QuotaCheck)?;
        gate.admit(self.len())?;

        let mut statuses: Vec<FileStatus> = self
            .files
            .iter()
            .map(|f| FileStatus {
                name: f.name.clone(),
                state: FileState::Pending,
                error: None,
                records: 0,
            })
            .collect();
        let mut records = Vec::new();
        let mut quota_after = Some(gate.quota());

        observer(BatchEvent::Started { total: self.len() });

        for (index, file) in self.files.iter().enumerate() {
            statuses[index].state = FileState::InProgress;
            observer(BatchEvent::FileStarted {
                name: file.name.clone(),
            });

            match api.upload_document(tool, user_id, file).await {
                Ok(rows) => {
                    info!(file = %file.name, records = rows.len(), "file processed");
                    statuses[index].state = FileState::Completed;
                    statuses[index].records = rows.len();
                    observer(BatchEvent::FileCompleted {
                        name: file.name.clone(),
                        records: rows.len(),
                    });
                    records.extend(rows);

                    match QuotaGate::check(api, tool).await {
                        Ok(gate) => {
                            quota_after = Some(gate.quota());
                            observer(BatchEvent::QuotaUpdated {
                                quota: gate.quota(),
                            });
                        }
                        Err(e) => {
                            warn!(error = %e, "usage re-check failed");
                            quota_after = None;
                        }
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!(file = %file.name, error = %message, "file failed");
                    statuses[index].state = FileState::Error;
                    statuses[index].error = Some(message.clone());
                    observer(BatchEvent::FileFailed {
                        name: file.name.clone(),
                        error: message,
                    });
                }
            }
        }

        let report = BatchReport {
            statuses,
            records,
            quota_after,
        };
        observer(BatchEvent::Finished {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::error::ApiError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    enum Outcome {
        Records(usize),
        Fail(&'static str),
    }

    /// Scripted backend that logs every call it receives.
    ///
    /// `yield_now` between the start and end markers gives the scheduler
    /// every chance to interleave; a clean log therefore demonstrates
    /// that uploads really run one at a time.
    struct StubApi {
        quotas: RefCell<VecDeque<api::Result<UsageQuota>>>,
        uploads: RefCell<VecDeque<Outcome>>,
        log: RefCell<Vec<String>>,
    }

    impl StubApi {
        fn new(
            quotas: Vec<api::Result<UsageQuota>>,
            uploads: Vec<Outcome>,
        ) -> Self {
            Self {
                quotas: RefCell::new(quotas.into()),
                uploads: RefCell::new(uploads.into()),
                log: RefCell::new(Vec::new()),
            }
        }

        fn log_entries(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    fn counts(available: i64) -> api::Result<UsageQuota> {
        Ok(UsageQuota {
            available_count: Some(available),
            limit: Some(100),
        })
    }

    impl ExtractionApi for StubApi {
        async fn check_usage(&self, _tool: &str) -> api::Result<UsageQuota> {
            self.log.borrow_mut().push("quota".to_string());
            let next = self
                .quotas
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(UsageQuota::default()));
            tokio::task::yield_now().await;
            next
        }

        async fn upload_document(
            &self,
            _tool: &str,
            _user_id: &str,
            file: &SelectedFile,
        ) -> api::Result<Vec<ProcessedRecord>> {
            self.log.borrow_mut().push(format!("start:{}", file.name));
            tokio::task::yield_now().await;
            let outcome = self
                .uploads
                .borrow_mut()
                .pop_front()
                .expect("unexpected upload");
            let result = match outcome {
                Outcome::Records(n) => Ok((0..n)
                    .map(|i| {
                        let mut record = ProcessedRecord::new();
                        record.set("Produktname", format!("{}#{}", file.name, i));
                        record
                    })
                    .collect()),
                Outcome::Fail(message) => Err(ApiError::Status {
                    status: 500,
                    message: message.to_string(),
                }),
            };
            self.log.borrow_mut().push(format!("end:{}", file.name));
            result
        }
    }

    fn files(names: &[&str]) -> Vec<SelectedFile> {
        names
            .iter()
            .map(|n| SelectedFile::from_bytes(*n, vec![0u8; 4]))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_queue_is_rejected_before_any_request() {
        let api = StubApi::new(vec![], vec![]);
        let err = UploadQueue::new(vec![])
            .run(&api, "dataprocess", "1", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::NoFiles));
        assert!(api.log_entries().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_quota_issues_no_uploads() {
        let api = StubApi::new(vec![counts(2)], vec![]);
        let err = UploadQueue::new(files(&["a.pdf", "b.pdf", "c.pdf"]))
            .run(&api, "dataprocess", "1", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BatchError::QuotaDenied {
                requested: 3,
                available: 2
            }
        ));
        assert_eq!(api.log_entries(), vec!["quota"]);
    }

    #[tokio::test]
    async fn test_quota_check_failure_fails_closed() {
        let api = StubApi::new(
            vec![Err(ApiError::Status {
                status: 502,
                message: "bad gateway".to_string(),
            })],
            vec![],
        );
        let err = UploadQueue::new(files(&["a.pdf"]))
            .run(&api, "dataprocess", "1", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::QuotaCheck(_)));
        assert_eq!(api.log_entries(), vec!["quota"]);
    }

    #[tokio::test]
    async fn test_uploads_run_strictly_in_order() {
        let api = StubApi::new(
            vec![counts(10)],
            vec![Outcome::Records(1), Outcome::Records(1), Outcome::Records(1)],
        );
        let mut events = Vec::new();
        let report = UploadQueue::new(files(&["a.pdf", "b.pdf", "c.pdf"]))
            .run(&api, "dataprocess", "1", |e| events.push(e))
            .await
            .unwrap();

        assert_eq!(
            api.log_entries(),
            vec![
                "quota",
                "start:a.pdf",
                "end:a.pdf",
                "quota",
                "start:b.pdf",
                "end:b.pdf",
                "quota",
                "start:c.pdf",
                "end:c.pdf",
                "quota",
            ]
        );
        assert_eq!(report.succeeded(), 3);
        assert_eq!(events.first(), Some(&BatchEvent::Started { total: 3 }));
        assert_eq!(
            events.last(),
            Some(&BatchEvent::Finished {
                succeeded: 3,
                failed: 0
            })
        );
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_file() {
        let api = StubApi::new(
            vec![counts(10)],
            vec![Outcome::Records(3), Outcome::Fail("corrupt file")],
        );
        let mut events = Vec::new();
        let report = UploadQueue::new(files(&["a.pdf", "b.pdf"]))
            .run(&api, "dataprocess", "1", |e| events.push(e))
            .await
            .unwrap();

        assert_eq!(report.statuses[0].state, FileState::Completed);
        assert_eq!(report.statuses[0].records, 3);
        assert_eq!(report.statuses[1].state, FileState::Error);
        assert!(report.statuses.iter().all(|s| s.state.is_terminal()));
        assert!(
            report.statuses[1]
                .error
                .as_deref()
                .unwrap()
                .contains("corrupt file")
        );

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[0].text("Produktname"), "a.pdf#0");
        assert_eq!(report.records[2].text("Produktname"), "a.pdf#2");

        let terminal = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    BatchEvent::FileCompleted { .. } | BatchEvent::FileFailed { .. }
                )
            })
            .count();
        assert_eq!(terminal, 2);
        assert_eq!(
            events.last(),
            Some(&BatchEvent::Finished {
                succeeded: 1,
                failed: 1
            })
        );
    }

    #[tokio::test]
    async fn test_requery_failure_leaves_quota_unknown() {
        let api = StubApi::new(
            vec![
                counts(5),
                Err(ApiError::Status {
                    status: 500,
                    message: "flaky".to_string(),
                }),
                counts(3),
            ],
            vec![Outcome::Records(1), Outcome::Records(1)],
        );
        let mut updates = 0;
        let report = UploadQueue::new(files(&["a.pdf", "b.pdf"]))
            .run(&api, "dataprocess", "1", |e| {
                if matches!(e, BatchEvent::QuotaUpdated { .. }) {
                    updates += 1;
                }
            })
            .await
            .unwrap();

        // The failed re-check after a.pdf is recovered by the one after b.pdf.
        assert_eq!(updates, 1);
        assert_eq!(
            report.quota_after,
            Some(UsageQuota {
                available_count: Some(3),
                limit: Some(100),
            })
        );
    }
}
