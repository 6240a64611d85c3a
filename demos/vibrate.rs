//! Plays a short sequence of effects on every force-feedback device.

use std::{thread, time::Duration};

use viblib::{Coordinates, Device, EffectDescription, EffectType, Envelope, Error};

fn sleep(secs: u64) {
    thread::sleep(Duration::from_secs(secs));
}

fn main() -> Result<(), Error> {
    env_logger::init();

    println!("Scanning for devices");
    let mut devices = viblib::enumerate()?.collect::<Result<Vec<Device>, _>>()?;
    if devices.is_empty() {
        println!("Did not find any devices");
        return Ok(());
    }
    for device in &devices {
        println!("Found device: {} ({:?})", device.name(), device.capabilities());
    }

    println!("Periodic effect with envelope");
    let mut desc = EffectDescription::periodic(EffectType::Sine, 10000, 1000)
        .with_duration(2000)
        .with_envelope(Envelope {
            attack_time: 500,
            attack_level: 0,
            fade_time: 1500,
            fade_level: 0,
        });
    for (i, device) in devices.iter_mut().enumerate() {
        device.create_effect("vibrate", desc)?.start()?;
        println!("Playing on device {i}");
        sleep(2);
    }
    sleep(1);

    println!("Update effect");
    desc.periodic.magnitude = 20000;
    for device in &mut devices {
        device.update_effect("vibrate", desc)?;
        device.start_effect("vibrate")?;
    }
    sleep(3);

    println!("Constant effect with direction");
    let desc = EffectDescription::constant(30000)
        .with_duration(1000)
        .with_direction(Coordinates::POLAR, &[0, -10000, 0]);
    for device in &mut devices {
        if !device.supports(EffectType::Constant) {
            println!("{} does not support constant effects", device.name());
            continue;
        }
        device.create_effect("vibrate-constant", desc)?.start()?;
    }
    sleep(2);

    println!("Change effect type");
    for device in &mut devices {
        let Some(effect) = device.effect("vibrate-constant") else {
            continue;
        };
        let mut desc = *effect.description();
        desc.effect_type = EffectType::SawtoothUp;
        desc.params.duration = 500;
        desc.periodic.magnitude = 10000;
        device.update_effect("vibrate-constant", desc)?;
        device.start_effect("vibrate-constant")?;
    }
    sleep(1);

    println!("Delete effects");
    for device in &mut devices {
        device.delete_effect("vibrate")?;
        device.delete_effect("vibrate-constant")?;
    }

    println!("Done");
    Ok(())
}
