/// The logistic function, mapping logits to probabilities.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn f(&self, z: f32) -> f32 {
        // Only ever exponentiate non-positive values so large logits don't overflow.
        if z >= 0.0 {
            1. / (1. + (-z).exp())
        } else {
            let e = z.exp();
            e / (1. + e)
        }
    }

    pub fn df(&self, z: f32) -> f32 {
        let s = self.f(z);
        s * (1. - s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(Sigmoid.f(0.), 0.5);
        assert!((Sigmoid.f(2.) - 0.880_797).abs() < 1e-6);
        assert!((Sigmoid.f(-2.) - 0.119_203).abs() < 1e-6);
        assert_eq!(Sigmoid.df(0.), 0.25);
    }

    #[test]
    fn saturates_without_nans() {
        assert_eq!(Sigmoid.f(1000.), 1.);
        assert_eq!(Sigmoid.f(-1000.), 0.);
        assert!(Sigmoid.df(-1000.).is_finite());
    }
}
