use log::debug;
use ndarray::{Array1, Array2, Axis, s};
use ndarray_rand::RandomExt;
use rand::{
    Rng,
    distr::{StandardUniform, Uniform},
    seq::{SliceRandom, index},
};
use rand_distr::StandardNormal;

use super::Dataset;
use crate::{MlErr, Result, random::generate_rng};

/// Above this many informative dimensions the hypercube vertices are no longer drawn without
/// replacement, the extra dimensions are filled with random bits instead.
const MAX_EXACT_HYPERCUBE_DIM: usize = 30;

/// Generator of random classification problems.
///
/// Each class is made of gaussian clusters placed on the vertices of a hypercube spanned by the
/// informative features. The remaining columns are linear combinations of the informative ones
/// (redundant), copies of them (repeated) or pure noise (useless).
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticClassification {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_informative: usize,
    pub n_redundant: usize,
    pub n_repeated: usize,
    pub n_classes: usize,
    pub n_clusters_per_class: usize,
    /// Fraction of labels replaced by a random class.
    pub flip_y: f32,
    /// Half the side of the hypercube the cluster centroids sit on.
    pub class_sep: f32,
    /// Whether centroids are exactly the hypercube vertices or randomly scaled versions of them.
    pub hypercube: bool,
    /// Added to every feature, drawn per feature in `[-class_sep, class_sep)` when `None`.
    pub shift: Option<f32>,
    /// Multiplies every feature after shifting, drawn per feature in `[1, 101)` when `None`.
    pub scale: Option<f32>,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for SyntheticClassification {
    fn default() -> Self {
        Self {
            n_samples: 100,
            n_features: 20,
            n_informative: 2,
            n_redundant: 2,
            n_repeated: 0,
            n_classes: 2,
            n_clusters_per_class: 2,
            flip_y: 0.01,
            class_sep: 1.0,
            hypercube: true,
            shift: Some(0.0),
            scale: Some(1.0),
            shuffle: true,
            seed: None,
        }
    }
}

impl SyntheticClassification {
    /// Generates a new dataset.
    ///
    /// # Returns
    /// The dataset or an error if the configuration is inconsistent.
    pub fn generate(&self) -> Result<Dataset> {
        self.validate()?;

        let &Self {
            n_samples,
            n_features,
            n_informative,
            n_redundant,
            n_repeated,
            n_classes,
            class_sep,
            ..
        } = self;

        let n_clusters = self.n_clusters();
        let n_useless = n_features - n_informative - n_redundant - n_repeated;
        let mut rng = generate_rng(self.seed);
        let symmetric = Uniform::new(-1.0f32, 1.0)
            .map_err(|e| MlErr::invalid("covariance range", e.to_string()))?;

        let mut per_cluster = vec![n_samples / n_clusters; n_clusters];
        per_cluster
            .iter_mut()
            .take(n_samples % n_clusters)
            .for_each(|count| *count += 1);

        let centroids = self.centroids(&mut rng);

        let mut x = Array2::<f32>::zeros((n_samples, n_features));
        let mut y = Array1::<usize>::zeros(n_samples);

        x.slice_mut(s![.., ..n_informative]).assign(&Array2::<f32>::random_using(
            (n_samples, n_informative),
            StandardNormal,
            &mut rng,
        ));

        let mut start = 0;
        for (k, (&count, centroid)) in per_cluster.iter().zip(centroids.rows()).enumerate() {
            let stop = start + count;
            y.slice_mut(s![start..stop]).fill(k % n_classes);

            let covariance =
                Array2::<f32>::random_using((n_informative, n_informative), &symmetric, &mut rng);
            let mut cluster = x.slice_mut(s![start..stop, ..n_informative]);
            let moved = cluster.dot(&covariance) + &centroid;
            cluster.assign(&moved);

            start = stop;
        }

        if n_redundant > 0 {
            let mixing =
                Array2::<f32>::random_using((n_informative, n_redundant), &symmetric, &mut rng);
            let redundant = x.slice(s![.., ..n_informative]).dot(&mixing);
            x.slice_mut(s![.., n_informative..n_informative + n_redundant])
                .assign(&redundant);
        }

        let n_sources = n_informative + n_redundant;
        for col in n_sources..n_sources + n_repeated {
            let source = ((n_sources - 1) as f32 * rng.random::<f32>() + 0.5) as usize;
            let copy = x.column(source).to_owned();
            x.column_mut(col).assign(&copy);
        }

        if n_useless > 0 {
            x.slice_mut(s![.., n_features - n_useless..])
                .assign(&Array2::<f32>::random_using(
                    (n_samples, n_useless),
                    StandardNormal,
                    &mut rng,
                ));
        }

        if self.flip_y > 0.0 {
            let mut flipped = 0;
            for label in y.iter_mut() {
                if rng.random::<f32>() < self.flip_y {
                    *label = rng.random_range(0..n_classes);
                    flipped += 1;
                }
            }
            debug!("label noise touched {flipped} of {n_samples} samples");
        }

        let shift = match self.shift {
            Some(shift) => Array1::from_elem(n_features, shift),
            None => Array1::<f32>::random_using(n_features, StandardUniform, &mut rng)
                .mapv(|u| (2.0 * u - 1.0) * class_sep),
        };
        x += &shift;

        let scale = match self.scale {
            Some(scale) => Array1::from_elem(n_features, scale),
            None => Array1::<f32>::random_using(n_features, StandardUniform, &mut rng)
                .mapv(|u| 1.0 + 100.0 * u),
        };
        x *= &scale;

        if self.shuffle {
            let mut rows: Vec<usize> = (0..n_samples).collect();
            rows.shuffle(&mut rng);
            x = x.select(Axis(0), &rows);
            y = y.select(Axis(0), &rows);

            let mut cols: Vec<usize> = (0..n_features).collect();
            cols.shuffle(&mut rng);
            x = x.select(Axis(1), &cols);
        }

        debug!(
            "generated {n_samples} samples with {n_features} features over {n_clusters} clusters"
        );

        Dataset::new(x, y)
    }

    /// Places one centroid per cluster on the vertices of the informative hypercube, at
    /// `±class_sep`. When `hypercube` is off, every centroid and every dimension is stretched by a
    /// random factor.
    fn centroids<R: Rng>(&self, rng: &mut R) -> Array2<f32> {
        let class_sep = self.class_sep;
        let mut centroids = hypercube(self.n_clusters(), self.n_informative, rng);
        centroids.mapv_inplace(|v| v * 2.0 * class_sep - class_sep);

        if !self.hypercube {
            let per_cluster =
                Array2::<f32>::random_using((self.n_clusters(), 1), StandardUniform, rng);
            centroids *= &(per_cluster * 2.0);
            centroids *=
                &Array2::<f32>::random_using((1, self.n_informative), StandardUniform, rng);
        }

        centroids
    }

    fn n_clusters(&self) -> usize {
        self.n_classes * self.n_clusters_per_class
    }

    fn validate(&self) -> Result<()> {
        if self.n_samples == 0 {
            return Err(MlErr::invalid("n_samples", "must be at least 1"));
        }

        if self.n_informative == 0 {
            return Err(MlErr::invalid("n_informative", "must be at least 1"));
        }

        if self.n_classes < 2 {
            return Err(MlErr::invalid("n_classes", "must be at least 2"));
        }

        if self.n_clusters_per_class == 0 {
            return Err(MlErr::invalid("n_clusters_per_class", "must be at least 1"));
        }

        let used = self.n_informative + self.n_redundant + self.n_repeated;
        if used > self.n_features {
            return Err(MlErr::invalid(
                "n_features",
                format!(
                    "informative, redundant and repeated features add up to {used}, more than the {} available",
                    self.n_features
                ),
            ));
        }

        let vertices_suffice = self.n_informative >= usize::BITS as usize - 1
            || self.n_clusters() <= 1 << self.n_informative;
        if !vertices_suffice {
            return Err(MlErr::invalid(
                "n_informative",
                format!(
                    "{} clusters do not fit on the vertices of a {}-dimensional hypercube",
                    self.n_clusters(),
                    self.n_informative
                ),
            ));
        }

        if !(0.0..=1.0).contains(&self.flip_y) {
            return Err(MlErr::invalid("flip_y", "must be in [0, 1]"));
        }

        Ok(())
    }
}

/// Picks `samples` distinct vertices of the unit hypercube of the given dimension, one per row.
fn hypercube<R: Rng>(samples: usize, dimensions: usize, rng: &mut R) -> Array2<f32> {
    let mut out = Array2::zeros((samples, dimensions));

    if dimensions > MAX_EXACT_HYPERCUBE_DIM {
        let extra = dimensions - MAX_EXACT_HYPERCUBE_DIM;
        out.slice_mut(s![.., ..extra])
            .mapv_inplace(|_: f32| if rng.random::<bool>() { 1.0 } else { 0.0 });
        out.slice_mut(s![.., extra..])
            .assign(&hypercube(samples, MAX_EXACT_HYPERCUBE_DIM, rng));
        return out;
    }

    let vertices = index::sample(rng, 1 << dimensions, samples);
    for (mut row, vertex) in out.rows_mut().into_iter().zip(vertices.iter()) {
        for (d, coord) in row.iter_mut().enumerate() {
            *coord = ((vertex >> (dimensions - 1 - d)) & 1) as f32;
        }
    }

    out
}
