//! Animation playback and state selection.
//!
//! Clips are fixed-rate frame sequences. Each character owns one clip per
//! [`AnimationKey`]; the active clip is chosen every tick by [`select_state`]
//! and only rewinds when the key changes.

use crate::sprites::manifest::FrameHandle;

/// Horizontal speed below which a grounded character counts as idle.
pub const MOVE_DEADZONE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackVariant {
    Normal,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Idle,
    Move,
    Airborne,
    Attack(AttackVariant),
}

impl AnimationKey {
    pub const COUNT: usize = 5;

    pub const ALL: [AnimationKey; Self::COUNT] = [
        AnimationKey::Idle,
        AnimationKey::Move,
        AnimationKey::Airborne,
        AnimationKey::Attack(AttackVariant::Normal),
        AnimationKey::Attack(AttackVariant::Special),
    ];

    pub fn index(self) -> usize {
        match self {
            AnimationKey::Idle => 0,
            AnimationKey::Move => 1,
            AnimationKey::Airborne => 2,
            AnimationKey::Attack(AttackVariant::Normal) => 3,
            AnimationKey::Attack(AttackVariant::Special) => 4,
        }
    }
}

/// Pick the clip for the current state. Attacking beats airborne beats
/// moving beats idle.
pub fn select_state(attack: Option<AttackVariant>, airborne: bool, speed_x: f32) -> AnimationKey {
    if let Some(variant) = attack {
        AnimationKey::Attack(variant)
    } else if airborne {
        AnimationKey::Airborne
    } else if speed_x.abs() > MOVE_DEADZONE {
        AnimationKey::Move
    } else {
        AnimationKey::Idle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<FrameHandle>,
    frame_duration: f32,
    looping: bool,
    current: usize,
    timer: f32,
    finished: bool,
}

impl Animation {
    /// Panics on an empty clip or a non-positive frame duration; both are
    /// authoring mistakes in the clip table.
    pub fn new(frames: Vec<FrameHandle>, frame_duration: f32, looping: bool) -> Self {
        assert!(!frames.is_empty(), "animation needs at least one frame");
        assert!(
            frame_duration > 0.0,
            "frame duration must be positive, got {frame_duration}"
        );
        Self {
            frames,
            frame_duration,
            looping,
            current: 0,
            timer: 0.0,
            finished: false,
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.timer = 0.0;
        self.finished = false;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        self.timer += dt.max(0.0);
        while self.timer >= self.frame_duration {
            self.timer -= self.frame_duration;
            if self.current + 1 < self.frames.len() {
                self.current += 1;
            } else if self.looping {
                self.current = 0;
            } else {
                self.finished = true;
                self.timer = 0.0;
                break;
            }
        }
    }

    pub fn current_frame(&self) -> &FrameHandle {
        &self.frames[self.current]
    }

    pub fn frame_index(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Time to play every frame once.
    pub fn total_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }
}

/// One clip per [`AnimationKey`], indexed by [`AnimationKey::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    clips: Vec<Animation>,
}

impl AnimationSet {
    /// Panics if any key is missing or listed twice.
    pub fn from_clips(clips: Vec<(AnimationKey, Animation)>) -> Self {
        let mut slots: Vec<Option<Animation>> = vec![None; AnimationKey::COUNT];
        for (key, clip) in clips {
            let slot = &mut slots[key.index()];
            assert!(slot.is_none(), "duplicate animation for {key:?}");
            *slot = Some(clip);
        }

        let clips = slots
            .into_iter()
            .zip(AnimationKey::ALL)
            .map(|(slot, key)| match slot {
                Some(clip) => clip,
                None => panic!("missing animation for {key:?}"),
            })
            .collect();

        Self { clips }
    }

    pub fn get(&self, key: AnimationKey) -> &Animation {
        &self.clips[key.index()]
    }

    pub fn get_mut(&mut self, key: AnimationKey) -> &mut Animation {
        &mut self.clips[key.index()]
    }
}

/// Tracks the active clip and switches on key changes.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlayer {
    set: AnimationSet,
    active: AnimationKey,
}

impl AnimationPlayer {
    pub fn new(set: AnimationSet) -> Self {
        Self {
            set,
            active: AnimationKey::Idle,
        }
    }

    /// Switch to `key` (rewinding it) if it differs from the active key,
    /// otherwise advance the active clip.
    pub fn update(&mut self, key: AnimationKey, dt: f32) {
        if key != self.active {
            self.active = key;
            self.set.get_mut(key).reset();
        } else {
            self.set.get_mut(key).advance(dt);
        }
    }

    pub fn active_key(&self) -> AnimationKey {
        self.active
    }

    pub fn active(&self) -> &Animation {
        self.set.get(self.active)
    }

    pub fn clip(&self, key: AnimationKey) -> &Animation {
        self.set.get(key)
    }
}

/// Per-character visual state. Characters whose sheets failed to load fall
/// back to a flat-colour placeholder and never switch clips.
#[derive(Debug, Clone, PartialEq)]
pub enum Animator {
    Animated(AnimationPlayer),
    Placeholder,
}

impl Animator {
    pub fn update(&mut self, key: AnimationKey, dt: f32) {
        if let Animator::Animated(player) = self {
            player.update(key, dt);
        }
    }

    pub fn current_frame(&self) -> Option<&FrameHandle> {
        match self {
            Animator::Animated(player) => Some(player.active().current_frame()),
            Animator::Placeholder => None,
        }
    }

    /// The playing clip and its key, `None` for placeholders.
    pub fn active_clip(&self) -> Option<(AnimationKey, &Animation)> {
        match self {
            Animator::Animated(player) => Some((player.active_key(), player.active())),
            Animator::Placeholder => None,
        }
    }

    pub fn clip_duration(&self, key: AnimationKey) -> Option<f32> {
        match self {
            Animator::Animated(player) => Some(player.clip(key).total_duration()),
            Animator::Placeholder => None,
        }
    }
}
