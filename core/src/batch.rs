use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::server::SearchServer;

/// Runs [`SearchServer::find_top_documents`] for every query on the server's
/// worker pool. Results come back in query order.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    server.pool().install(|| {
        queries
            .par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect()
    })
}

/// [`process_queries`] flattened into one list, still in query order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
