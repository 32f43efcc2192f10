// Which fingers are up, decided from one frame's keypoints.
// No memory between frames: a flicker at a gesture boundary shows up as-is.

use crate::landmarks::{find_hand, idx, Hand, Handedness, Keypoints};

/// Thumb tip may sit this many pixels on the "wrong" side of its joint and still count as out.
pub const THUMB_TOLERANCE: i32 = 10;

const FINGER_TIPS: [usize; 4] = [idx::INDEX_TIP, idx::MIDDLE_TIP, idx::RING_TIP, idx::PINKY_TIP];

/// Extended flags for thumb, index, middle, ring, pinky (in that order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gesture(pub [bool; 5]);

impl Gesture {
    #[cfg(test)]
    pub fn thumb(&self) -> bool {
        self.0[0]
    }

    pub fn index(&self) -> bool {
        self.0[1]
    }

    pub fn middle(&self) -> bool {
        self.0[2]
    }

    pub fn ring(&self) -> bool {
        self.0[3]
    }

    pub fn pinky(&self) -> bool {
        self.0[4]
    }

    /// Build from 0/1 flags, e.g. `[0, 1, 0, 0, 0]`.
    #[cfg(test)]
    pub fn from_bits(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// Read the finger flags off one hand.
    ///
    /// The thumb is judged sideways: its tip against the joint just before it,
    /// mirrored between left and right hands. The other four are judged
    /// vertically: a finger is up when its tip is higher on screen (smaller y)
    /// than the joint two positions back along the same finger.
    pub fn from_keypoints(kp: &Keypoints, hand: Handedness) -> Self {
        let tip = kp.at(idx::THUMB_TIP).x;
        let joint = kp.at(idx::THUMB_IP).x;
        let thumb = match hand {
            Handedness::Right => tip < joint + THUMB_TOLERANCE,
            Handedness::Left => tip > joint - THUMB_TOLERANCE,
        };

        let mut flags = [thumb, false, false, false, false];
        for (slot, &finger_tip) in flags[1..].iter_mut().zip(FINGER_TIPS.iter()) {
            *slot = kp.at(finger_tip).y < kp.at(finger_tip - 2).y;
        }
        Self(flags)
    }
}

/// Gesture of the requested hand, or None when that hand is not in view.
pub fn classify(hands: &[Hand], wanted: Handedness) -> Option<(Gesture, &Keypoints)> {
    let hand = find_hand(hands, wanted)?;
    Some((Gesture::from_keypoints(&hand.keypoints, wanted), &hand.keypoints))
}
