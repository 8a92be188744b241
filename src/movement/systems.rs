//! Movement domain: keyboard sampling.

use bevy::prelude::*;

use crate::movement::PlayerInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    input.axis_x = x;
    input.jump_pressed = keyboard.any_just_pressed([KeyCode::Space, KeyCode::KeyK, KeyCode::ArrowUp]);
    input.attack_pressed = keyboard.any_just_pressed([KeyCode::KeyX, KeyCode::KeyJ]);
    input.special_pressed = keyboard.any_just_pressed([KeyCode::KeyZ, KeyCode::KeyL]);
}
