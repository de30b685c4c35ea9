pub(super) const fn normalize_limit(limit: Option<u32>) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    match limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(limit) if limit > MAX_LIMIT => MAX_LIMIT,
        Some(limit) => limit,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_limit;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(normalize_limit(None), 20);
        assert_eq!(normalize_limit(Some(0)), 20);
        assert_eq!(normalize_limit(Some(5)), 5);
        assert_eq!(normalize_limit(Some(500)), 100);
    }
}
