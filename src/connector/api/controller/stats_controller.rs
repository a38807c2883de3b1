use anyhow::Result;

use crate::StoreStats;

use super::super::Container;

pub struct StatsController<'a> {
    container: &'a Container,
}

impl<'a> StatsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let use_case = self.container.stats_use_case();
        let stats = use_case.execute().await?;
        Ok(self.format_stats(&stats))
    }

    fn format_stats(&self, stats: &StoreStats) -> String {
        format!(
            "FaceMatch Statistics\n====================\nUsers:            {}\nEmbeddings:       {}\nEmpty Embeddings: {}\nThreshold:        {:.2}\nStorage:          {}",
            stats.users,
            stats.embeddings,
            stats.empty_embeddings,
            self.container.threshold(),
            self.container.storage()
        )
    }
}
