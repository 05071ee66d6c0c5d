//! Built-in sample catalog used by the demo source and in tests.

use crate::profile::{Channel, FlightProfile};
use crate::record::{Record, SignalType};

const QUADCOPTER_IMAGE: &str =
  "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=300&h=200&fit=crop";
const FIXED_WING_IMAGE: &str =
  "https://images.unsplash.com/photo-1544947950-fa07a98d237f?w=300&h=200&fit=crop";

fn flight(
  max_height: &str,
  work_height: &str,
  duration: &str,
  range: &str,
  cruising: i64,
  max: i64,
) -> FlightProfile {
  FlightProfile {
    max_height: Some(max_height.to_string()),
    work_height: Some(work_height.to_string()),
    flight_duration: Some(duration.to_string()),
    flight_range: Some(range.to_string()),
    cruising_speed: Some(cruising.into()),
    max_speed: Some(max.into()),
  }
}

pub fn demo_records() -> Vec<Record> {
  vec![
    Record::new("1", "DJI Mavic 3")
      .with_frequency(2400)
      .with_range("900-1500")
      .with_signal_type(SignalType::FrequencyHopping)
      .with_image(QUADCOPTER_IMAGE)
      .with_description("Профессиональный квадрокоптер для съемки")
      .with_specs("Время полета: 46 мин, Камера: 4K/120fps")
      .with_flight(flight("6000 м", "500 м", "46 хв", "15 км", 68, 75))
      .with_channel(Channel::new("Управління", 2400, "ППРЧ, шифрування"))
      .with_channel(Channel::new("Відео", 5800, "HD передача, низька затримка")),
    Record::new("2", "Bayraktar TB2")
      .with_frequency(1200)
      .with_range("5000-15000")
      .with_signal_type(SignalType::FixedFrequency)
      .with_image(FIXED_WING_IMAGE)
      .with_description("Военный ударный БпЛА")
      .with_specs("Время полета: 27 ч, Дальность: 150 км")
      .with_flight(flight("8230 м", "5500 м", "27 год", "150 км", 130, 222))
      .with_channel(Channel::new("Командний канал", 1200, "Сателітний зв'язок, ФРЧ"))
      .with_channel(Channel::new("Передача даних", 1800, "Високошвидкісна передача")),
    Record::new("3", "DJI Mini 2")
      .with_frequency(2400)
      .with_range("500-1000")
      .with_signal_type(SignalType::FrequencyHopping)
      .with_image(QUADCOPTER_IMAGE)
      .with_description("Компактный дрон для начинающих")
      .with_specs("Время полета: 31 мин, Вес: 249г")
      .with_flight(flight("4000 м", "120 м", "31 хв", "10 км", 50, 57))
      .with_channel(Channel::new("Управління", 2400, "ППРЧ, автоматичне перемикання")),
    Record::new("4", "Shahed-136")
      .with_frequency(900)
      .with_range("2000-3000")
      .with_signal_type(SignalType::FixedFrequency)
      .with_image(FIXED_WING_IMAGE)
      .with_description("Камикадзе дрон")
      .with_specs("Дальность: 2500 км, Боевая часть: 50 кг")
      .with_flight(flight("4000 м", "1000 м", "Одноразовий", "2500 км", 185, 185))
      .with_channel(Channel::new("Навігація", 900, "GPS/ГЛОНАСС, автономний режим")),
    Record::new("5", "Reaper MQ-9")
      .with_frequency(1800)
      .with_range("8000-12000")
      .with_signal_type(SignalType::FixedFrequency)
      .with_image(FIXED_WING_IMAGE)
      .with_description("Американский военный БпЛА")
      .with_specs("Время полета: 14 ч, Дальность: 1850 км")
      .with_flight(flight("15240 м", "7620 м", "14 год", "1850 км", 230, 482))
      .with_channel(Channel::new("Ku-band", 1800, "Сателітний зв'язок, шифрування"))
      .with_channel(Channel::new("C-band", 4000, "Передача відео, телеметрія")),
    Record::new("6", "Phantom 4 Pro")
      .with_frequency(2400)
      .with_range("1000-1500")
      .with_signal_type(SignalType::FrequencyHopping)
      .with_image(QUADCOPTER_IMAGE)
      .with_description("Профессиональный квадрокоптер")
      .with_specs("Время полета: 30 мин, Камера: 4K/60fps")
      .with_flight(flight("6000 м", "500 м", "30 хв", "7 км", 50, 72))
      .with_channel(Channel::new("LightBridge", 2400, "HD відео, низька затримка"))
      .with_channel(Channel::new("Резервний", 5800, "Автоматичне перемикання")),
  ]
}
