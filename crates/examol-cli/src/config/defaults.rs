pub struct DefaultsConfig {
    pub to_select: usize,
    pub maximize: bool,
    pub alpha: f64,
    pub threshold: f64,
    pub epsilon: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            to_select: 10,
            maximize: true,
            alpha: 1.0,
            threshold: 0.0,
            epsilon: 0.0,
        }
    }
}
