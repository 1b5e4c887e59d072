#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryMetrics {
    pub total_routes_registered: usize,
    pub bulk_batches: usize,
    pub rejected_routes: usize,
}

impl RegistryMetrics {
    pub fn record_insert(&mut self) {
        self.total_routes_registered += 1;
    }

    pub fn record_bulk(&mut self, accepted: usize) {
        self.bulk_batches += 1;
        self.total_routes_registered += accepted;
    }

    pub fn record_rejection(&mut self) {
        self.rejected_routes += 1;
    }
}
