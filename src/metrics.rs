use crate::fragment::PriceSource;

#[derive(Debug, Clone)]
pub struct Metrics {
    requests: prometheus::IntCounterVec,
    sources: prometheus::IntCounterVec,
    price: prometheus::Gauge,
    last_update: prometheus::Gauge,
}

impl Metrics {
    pub fn new(registry: &prometheus::Registry) -> Result<Self, prometheus::Error> {
        let requests = prometheus::IntCounterVec::new(
            prometheus::Opts::new("price_requests_total", "Price lookups by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let sources = prometheus::IntCounterVec::new(
            prometheus::Opts::new(
                "price_source_total",
                "Successful price lookups by the JSON source that produced them",
            ),
            &["source"],
        )?;
        registry.register(Box::new(sources.clone()))?;

        let price = prometheus::Gauge::new(
            "price_ton_per_star",
            "The last served Price of one Star (in TON)",
        )?;
        registry.register(Box::new(price.clone()))?;

        let last_update =
            prometheus::Gauge::new("last_updated", "The Unix Timestamp of the last update")?;
        registry.register(Box::new(last_update.clone()))?;

        Ok(Self {
            requests,
            sources,
            price,
            last_update,
        })
    }

    pub fn record_success(&self, source: PriceSource, value: f64) {
        self.requests.with_label_values(&["ok"]).inc();
        self.sources.with_label_values(&[source.into()]).inc();
        self.price.set(value);

        if let Ok(unix_timestamp) =
            std::time::SystemTime::now().duration_since(std::time::SystemTime::UNIX_EPOCH)
        {
            self.last_update.set(unix_timestamp.as_secs() as f64);
        }
    }

    pub fn record_failure(&self, outcome: &str) {
        self.requests.with_label_values(&[outcome]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_outcomes() {
        let registry = prometheus::Registry::new();
        let metrics = Metrics::new(&registry).unwrap();

        metrics.record_success(PriceSource::NextData, 0.0064);
        metrics.record_failure("upstream");

        assert_eq!(metrics.requests.with_label_values(&["ok"]).get(), 1);
        assert_eq!(metrics.requests.with_label_values(&["upstream"]).get(), 1);
        assert_eq!(metrics.sources.with_label_values(&["next_data"]).get(), 1);
        assert_eq!(metrics.sources.with_label_values(&["data_route"]).get(), 0);
        assert_eq!(metrics.price.get(), 0.0064);
        assert!(metrics.last_update.get() > 0.0);
    }

    #[test]
    fn double_registration_fails() {
        let registry = prometheus::Registry::new();
        Metrics::new(&registry).unwrap();
        assert!(Metrics::new(&registry).is_err());
    }
}
