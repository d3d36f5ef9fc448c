use crate::core::animation::settings::AnimationSettings;
use crate::core::animation::state::AnimationState;
use crate::core::view::transform::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationStepReport {
    /// The view moved this tick.
    pub changed: bool,
    /// The animation reached or crossed its target and is now idle.
    pub finished: bool,
}

/// Advances the active animation by `elapsed_secs`.
///
/// Applies a synthetic wheel delta of `direction * elapsed * speed` at the
/// anchor, where `direction = sign(scale - target)`. The animation ends when
/// that sign flips or becomes zero; the overshoot is kept.
pub fn step_animation(
    state: &mut AnimationState,
    view: &mut ViewTransform,
    elapsed_secs: f64,
    modifier_held: bool,
    settings: &AnimationSettings,
) -> AnimationStepReport {
    let AnimationState::Animating(animation) = *state else {
        return AnimationStepReport::default();
    };

    let direction = direction_to(view.scale(), animation.target_scale);
    if direction == 0.0 {
        *state = AnimationState::Idle;
        return AnimationStepReport {
            changed: false,
            finished: true,
        };
    }

    let safe_elapsed = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
        elapsed_secs
    } else {
        0.0
    };
    let delta = direction * safe_elapsed * settings.effective_speed(modifier_held);

    let changed = view.scroll_zoom(animation.anchor, delta, settings.zoom_sensitivity);

    let finished = direction_to(view.scale(), animation.target_scale) != direction;
    if finished {
        *state = AnimationState::Idle;
    }

    AnimationStepReport { changed, finished }
}

fn direction_to(scale: f64, target: f64) -> f64 {
    let difference = scale - target;
    if difference > 0.0 {
        1.0
    } else if difference < 0.0 {
        -1.0
    } else {
        0.0
    }
}
