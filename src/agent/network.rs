//! Q-value network using Burn framework

use burn::module::{Module, Param};
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use super::encoder::{FEATURE_SIZE, FeatureVector};
use crate::error::Error;
use crate::sequencer::ACTION_COUNT;

/// Configuration for the value network
#[derive(Debug, Config)]
pub struct NetworkConfig {
    /// Input width (feature vector size)
    pub input_size: usize,
    /// First hidden layer width
    pub hidden_size: usize,
    /// Second hidden layer width
    pub second_hidden_size: usize,
    /// One output per macro-action
    pub output_size: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_size: FEATURE_SIZE,
            hidden_size: 128,
            second_hidden_size: 64,
            output_size: ACTION_COUNT,
        }
    }
}

/// MLP mapping a feature vector to one Q-value per macro-action
#[derive(Module, Debug)]
pub struct ValueNetwork<B: Backend> {
    input: Linear<B>,
    hidden: Linear<B>,
    output: Linear<B>,
    activation: Relu,
}

impl<B: Backend> ValueNetwork<B> {
    pub fn new(device: &B::Device, config: &NetworkConfig) -> Self {
        Self {
            input: LinearConfig::new(config.input_size, config.hidden_size).init(device),
            hidden: LinearConfig::new(config.hidden_size, config.second_hidden_size).init(device),
            output: LinearConfig::new(config.second_hidden_size, config.output_size).init(device),
            activation: Relu::new(),
        }
    }

    /// [batch, FEATURE_SIZE] -> [batch, ACTION_COUNT]
    pub fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.activation.forward(self.input.forward(states));
        let x = self.activation.forward(self.hidden.forward(x));
        self.output.forward(x)
    }

    /// Q-values for a single state
    pub fn q_values(
        &self,
        features: &FeatureVector,
        device: &B::Device,
    ) -> crate::error::Result<Vec<f32>> {
        let state = Tensor::<B, 1>::from_floats(features.as_slice(), device)
            .reshape([1, FEATURE_SIZE]);
        self.forward(state)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| Error::Tensor(format!("{e:?}")))
    }

    /// Polyak update: `self = tau * source + (1 - tau) * self`, per parameter
    pub fn soft_update(&mut self, source: &Self, tau: f64) {
        blend_linear(&mut self.input, &source.input, tau);
        blend_linear(&mut self.hidden, &source.hidden, tau);
        blend_linear(&mut self.output, &source.output, tau);
    }
}

fn blend_linear<B: Backend>(target: &mut Linear<B>, source: &Linear<B>, tau: f64) {
    target.weight = blend_param(target.weight.clone(), &source.weight, tau);
    if let (Some(bias), Some(source_bias)) = (target.bias.as_mut(), source.bias.as_ref()) {
        *bias = blend_param(bias.clone(), source_bias, tau);
    }
}

fn blend_param<B: Backend, const D: usize>(
    target: Param<Tensor<B, D>>,
    source: &Param<Tensor<B, D>>,
    tau: f64,
) -> Param<Tensor<B, D>> {
    let source = source.val();
    target.map(|current| {
        current
            .mul_scalar(1.0 - tau)
            .add(source.clone().mul_scalar(tau))
    })
}
