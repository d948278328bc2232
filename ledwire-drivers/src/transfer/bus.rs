//! SPI bus bring-up
//!
//! The bus is configured once per transfer. With DMA enabled the DMA
//! controller is initialised and opened first. None of these failures stop
//! the transfer: they are logged, reported, and the send loop runs anyway.

use ledwire_core::config::{SpiSettings, TransferConfig};
use ledwire_hal::spi::{FrameFormat, FrameSize, Phase, Polarity, TransferMode};
use ledwire_hal::{Dma, SpiAttributes, SpiBus, SpiBusId, SpiExtraAttributes};

/// What went wrong during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupReport {
    /// DMA init or open failed
    pub dma_failed: bool,
    /// SPI init failed
    pub bus_failed: bool,
}

impl SetupReport {
    /// Check if every step succeeded
    pub fn is_clean(&self) -> bool {
        !self.dma_failed && !self.bus_failed
    }
}

/// Single-slave master attributes for pushing LED frames
pub fn master_attributes(settings: &SpiSettings) -> SpiAttributes {
    let (polarity, phase): (Polarity, Phase) = settings.mode.into();
    SpiAttributes {
        is_slave: false,
        slave_count: 1,
        bus_clock_hz: settings.bus_clock_hz,
        frequency_mhz: settings.frequency_mhz,
        polarity,
        phase,
        frame_format: FrameFormat::Standard,
        frame_size: FrameSize::Bits8,
        transfer_mode: TransferMode::TxRx,
        slave_select_toggle: true,
    }
}

/// Initialise DMA (if enabled) and then the SPI bus
pub fn bring_up<B: SpiBus, D: Dma>(
    spi: &mut B,
    dma: &mut D,
    bus: SpiBusId,
    config: &TransferConfig,
) -> SetupReport {
    let mut report = SetupReport::default();

    if config.trace {
        #[cfg(feature = "defmt")]
        defmt::debug!("spi{} master init start", bus.0);
    }

    let extra = SpiExtraAttributes {
        tx_use_dma: config.use_dma,
    };

    if config.use_dma {
        if config.trace {
            #[cfg(feature = "defmt")]
            defmt::debug!("spi{} master dma init start", bus.0);
        }
        if let Err(_e) = dma.init() {
            #[cfg(feature = "defmt")]
            defmt::warn!("dma init failed: {:?}", defmt::Debug2Format(&_e));
            report.dma_failed = true;
        }
        if let Err(_e) = dma.open() {
            #[cfg(feature = "defmt")]
            defmt::warn!("dma open failed: {:?}", defmt::Debug2Format(&_e));
            report.dma_failed = true;
        }
        if config.trace {
            #[cfg(feature = "defmt")]
            defmt::debug!("spi{} master dma open end", bus.0);
        }
    }

    match spi.init(bus, &master_attributes(&config.spi), &extra) {
        Ok(()) => {
            #[cfg(feature = "defmt")]
            defmt::info!("spi{} init success", bus.0);
        }
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("spi{} init failed: {:?}", bus.0, defmt::Debug2Format(&_e));
            report.bus_failed = true;
        }
    }

    if config.trace {
        #[cfg(feature = "defmt")]
        defmt::debug!("spi{} master init end", bus.0);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledwire_hal::spi::Mode;

    #[test]
    fn test_master_attributes_defaults() {
        let attrs = master_attributes(&SpiSettings::default());

        assert!(!attrs.is_slave);
        assert_eq!(attrs.slave_count, 1);
        assert_eq!(attrs.frequency_mhz, 3);
        assert_eq!(attrs.polarity, Polarity::IdleLow);
        assert_eq!(attrs.phase, Phase::CaptureOnFirstTransition);
        assert_eq!(attrs.frame_format, FrameFormat::Standard);
        assert_eq!(attrs.frame_size, FrameSize::Bits8);
    }

    #[test]
    fn test_master_attributes_follow_mode() {
        let settings = SpiSettings {
            mode: Mode::Mode2,
            frequency_mhz: 4,
            ..SpiSettings::default()
        };
        let attrs = master_attributes(&settings);

        assert_eq!(attrs.polarity, Polarity::IdleHigh);
        assert_eq!(attrs.phase, Phase::CaptureOnFirstTransition);
        assert_eq!(attrs.frequency_mhz, 4);
    }

    #[test]
    fn test_clean_report() {
        assert!(SetupReport::default().is_clean());
        assert!(!SetupReport {
            dma_failed: true,
            bus_failed: false
        }
        .is_clean());
    }
}
