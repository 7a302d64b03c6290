use std::collections::VecDeque;

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::server::{ExecutionPolicy, SearchServer};

/// Remembers, for the most recent requests, which ones found nothing.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    capacity: usize,
    no_result_count: usize,
    policy: ExecutionPolicy,
}

impl<'a> RequestQueue<'a> {
    /// Window size comes from the server's `request_window`.
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_capacity(server, server.config().request_window)
    }

    pub fn with_capacity(server: &'a SearchServer, capacity: usize) -> Self {
        RequestQueue {
            server,
            requests: VecDeque::with_capacity(capacity),
            capacity,
            no_result_count: 0,
            policy: ExecutionPolicy::Sequential,
        }
    }

    /// Execution mode used for every request made through this queue.
    pub fn with_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Active)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, move |_, document_status, _| document_status == status)
    }

    pub fn add_find_request_with<F>(&mut self, raw_query: &str, predicate: F) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let documents = self.server.find_top_documents_with(self.policy, raw_query, predicate)?;
        self.record(documents.is_empty());
        Ok(documents)
    }

    /// Empty results among the remembered requests.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, empty: bool) {
        if self.capacity == 0 {
            return;
        }
        if self.requests.len() == self.capacity {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_count -= 1;
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineConfig, StopWords};

    #[test]
    fn old_requests_fall_out_of_the_window() {
        let config = EngineConfig { worker_threads: Some(1), ..EngineConfig::default() };
        let mut server = SearchServer::with_config(StopWords::parse("and in at").unwrap(), config).unwrap();
        server.add_document(1, "curly cat curly tail", DocumentStatus::Active, &[7, 2, 7]).unwrap();
        server.add_document(2, "curly dog and fancy collar", DocumentStatus::Active, &[1, 2, 3]).unwrap();
        server.add_document(3, "big cat fancy collar ", DocumentStatus::Active, &[1, 2, 8]).unwrap();
        server.add_document(4, "big dog sparrow Eugene", DocumentStatus::Active, &[1, 3, 2]).unwrap();
        server.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Active, &[1, 1, 1]).unwrap();

        let mut queue = RequestQueue::new(&server);
        for _ in 0..1439 {
            queue.add_find_request("empty request").unwrap();
        }
        queue.add_find_request("curly dog").unwrap();
        queue.add_find_request("big collar").unwrap();
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), 1437);
    }

    #[test]
    fn failed_queries_are_not_recorded() {
        let server = SearchServer::new("").unwrap();
        let mut queue = RequestQueue::with_capacity(&server, 3).with_policy(ExecutionPolicy::Parallel);
        assert!(queue.add_find_request("--bad").is_err());
        assert_eq!(queue.no_result_requests(), 0);
        queue.add_find_request_by_status("cat", DocumentStatus::Banned).unwrap();
        queue.add_find_request_with("cat", |_, _, rating| rating > 0).unwrap();
        assert_eq!(queue.no_result_requests(), 2);
    }
}
