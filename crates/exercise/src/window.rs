use {
    crate::{
        config::{EvictionPolicy, PredictorConfig},
        error::Result,
        pose::PoseObservation,
    },
    std::fmt,
};

/// Bounded, oldest-first history of confident pose observations.
///
/// Backed by a ring of `capacity + 1` slots so that the legacy policy, which
/// lets the window grow one entry past capacity before evicting, never needs
/// to reallocate. Eviction always drops `eviction_batch_size` entries from the
/// front at once.
pub struct PoseWindow {
    slots: Vec<Option<PoseObservation>>,
    head: usize,
    len: usize,
    capacity: usize,
    eviction_batch_size: usize,
    min_confidence: f32,
    policy: EvictionPolicy,
}

impl fmt::Debug for PoseWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoseWindow")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("eviction_batch_size", &self.eviction_batch_size)
            .field("min_confidence", &self.min_confidence)
            .field("policy", &self.policy)
            .finish()
    }
}

impl PoseWindow {
    /// # Errors
    /// `ExerciseError::Config` if `config` does not validate.
    pub fn new(config: &PredictorConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.window_size();
        Ok(Self {
            slots: (0..capacity + 1).map(|_| None).collect(),
            head: 0,
            len: 0,
            capacity,
            eviction_batch_size: config.eviction_batch_size(),
            min_confidence: config.min_confidence(),
            policy: config.eviction_policy(),
        })
    }

    /// Offer an observation to the window.
    ///
    /// Observations whose overall confidence is not strictly above the
    /// threshold are dropped and `false` is returned. Otherwise the eviction
    /// check runs first, then the observation is appended.
    pub fn accept(&mut self, observation: PoseObservation) -> bool {
        let confident = observation.confidence > self.min_confidence;
        if !confident {
            base::log_debug!(
                "rejected pose with confidence {:.3} (threshold {:.3})",
                observation.confidence,
                self.min_confidence
            );
            return false;
        }

        let over = match self.policy {
            EvictionPolicy::Legacy => self.len > self.capacity,
            EvictionPolicy::Bounded => self.len >= self.capacity,
        };
        if over {
            let evicted = self.evict_front(self.eviction_batch_size);
            base::log_debug!("evicted {} poses, {} remain", evicted, self.len);
        }

        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = Some(observation);
        self.len += 1;
        true
    }

    /// Whether the window holds enough poses to classify.
    pub fn is_ready(&self) -> bool {
        match self.policy {
            EvictionPolicy::Legacy => self.len == self.capacity,
            EvictionPolicy::Bounded => self.len >= self.capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over buffered observations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PoseObservation> + '_ {
        let slot_count = self.slots.len();
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % slot_count].as_ref())
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    fn evict_front(&mut self, count: usize) -> usize {
        let count = count.min(self.len);
        let slot_count = self.slots.len();
        for _ in 0..count {
            self.slots[self.head] = None;
            self.head = (self.head + 1) % slot_count;
        }
        self.len -= count;
        count
    }
}
